pub mod annualized;
pub mod bollinger_bands;
