//! Profile models
//!
//! This module contains the data types flowing through the fetch pipeline:
//! - `profile` - The validated record shape (Profile, Address, Company) and ProfileId
//! - `page` - Page requests, raw fetch results and assembled pages

mod page;
mod profile;

pub use page::{FetchOutcome, PageOutcome, PageRequest, ProfilePage, RawPage, MAX_PAGE_SIZE};
pub use profile::{Address, Company, Profile, ProfileId};
