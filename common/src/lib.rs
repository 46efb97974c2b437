pub mod builders;
pub mod chart;
pub mod db;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod settings;
