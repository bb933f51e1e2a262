pub mod contribution_service;
pub mod person_service;

pub use contribution_service::ContributionService;
pub use person_service::{PersonForm, PersonService, Registration};
