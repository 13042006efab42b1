pub mod application;
pub mod ngo;
pub mod opportunity;
pub mod session;
pub mod volunteer;

pub use application::{Application, ApplicationStatus, NewApplication};
pub use ngo::Ngo;
pub use opportunity::{NewOpportunity, Opportunity};
pub use session::{Role, Session};
pub use volunteer::Volunteer;
