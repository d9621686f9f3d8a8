//! Domain models with validation at construction
//!
//! Form input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod user;
pub mod country;
pub mod visit;

pub use validation::ValidationError;
pub use user::{parse_user_id, ActiveUserPolicy, User, UserColor, UserName, DEFAULT_ACTIVE_USER};
pub use country::{Country, CountryFragment, CountryMatch};
pub use visit::{VisitOutcome, VisitPolicy, VisitedCountry};
