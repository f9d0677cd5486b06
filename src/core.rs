pub mod number;
pub mod reconcile;
pub mod reference;
pub mod series;
