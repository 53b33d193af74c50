//! Rickdex character search
//!
//! Validates the search form, turns it into API query parameters, fetches
//! one page of characters and filters it by episode count.
//!
//! ## Pipeline
//! - [`schema`]: per-field rules, defaults and validation
//! - [`form`]: edit/blur/submit/reset state controller
//! - [`query`]: form values to URL query parameters
//! - [`api`]: character types and the HTTP data source
//! - [`filter`]: minimum-episode post-filter
//!
//! ```rust,no_run
//! use rickdex_core::{Field, FormController, HttpCharacterSource, SubmitOutcome};
//!
//! # async fn run() -> rickdex_core::Result<()> {
//! let form = FormController::new(HttpCharacterSource::new(rickdex_core::DEFAULT_API_URL)?);
//! form.set_field(Field::Email, "rick@c137.com")?;
//! form.set_field(Field::Status, "alive")?;
//! form.set_field(Field::Accept, true)?;
//! if let SubmitOutcome::Finished(phase) = form.submit().await {
//!     println!("{:?}: {} characters", phase, form.snapshot().results.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod query;
pub mod schema;

pub use api::{Character, CharacterPage, CharacterSource, HttpCharacterSource, Lookup, PageInfo};
pub use config::{FinderConfig, DEFAULT_API_URL};
pub use error::{ApiError, FinderError, Result, SchemaError};
pub use filter::filter_by_min_episodes;
pub use form::{
    FormController, FormState, Phase, SubmitOutcome, EMPTY_RESULTS_MESSAGE, FETCH_ERROR_MESSAGE,
};
pub use query::{build_query, QueryParams};
pub use schema::{
    validate, validate_field, Field, FieldErrors, FieldValue, FormInput, FormValues, Rule, Species,
    Status, SCHEMA,
};
