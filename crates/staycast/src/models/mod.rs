pub mod gbdt;
pub mod regressor_trait;

pub use self::gbdt::GBDTRegressor;
pub use regressor_trait::RegressorModel;
