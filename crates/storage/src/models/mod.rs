mod attempt;
mod contest;
mod event;
mod person;
mod record;
mod record_config;
pub mod region;
mod result;

pub use attempt::{Attempt, DNF, DNS};
pub use contest::{Contest, ContestType};
pub use event::{Event, EventFormat, RoundFormat};
pub use person::Person;
pub use record::{Metric, RecordCandidate, RecordCategory, RecordTagUpdate, RecordType};
pub use record_config::RecordConfig;
pub use region::{Continent, Country, RegionScope, ResultRegions};
pub use result::EventResult;
