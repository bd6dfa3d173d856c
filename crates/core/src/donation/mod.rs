mod dates;
mod error;
mod requests;
mod rules;
mod types;

pub use dates::{format_date, format_datetime, parse_date, parse_datetime};
pub use error::ValidationError;
pub use requests::{ClaimForm, FoodForm, ProviderForm, ReceiverForm};
pub use rules::ensure_no_dependents;
pub use types::{
    Claim, ClaimStatus, FoodListing, NewClaim, NewFoodListing, NewProvider, NewReceiver, Provider,
    Receiver, Table,
};
