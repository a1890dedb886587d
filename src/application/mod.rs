// Application layer: text mapping and solve orchestration

pub mod cover_service;
pub mod mappers;

pub use cover_service::CoverService;
pub use mappers::{format_solution, parse_instance};
