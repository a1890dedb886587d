// Domain module: set cover models, contracts and the ILP formulation

pub mod formulation;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use formulation::*;
pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
