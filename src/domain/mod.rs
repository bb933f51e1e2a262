pub mod amount;
pub mod common;
pub mod contribution;
pub mod period;
pub mod person;

pub use amount::coerce_amount;
pub use common::{Displayable, Identifiable};
pub use contribution::Contribution;
pub use period::Period;
pub use person::{Person, PersonDraft};
