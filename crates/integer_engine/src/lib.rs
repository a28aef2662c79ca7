/* 📖 # What lives in integer_engine?

Everything the server computes and serves, with no direct I/O:
- `fibonacci` and `happy`: the two sequences, as iterators plus calculators
- `cache`: the shared memo of happy number classifications
- `facade`: name-based dispatch to the calculators
- `config`: the optional `integer_server.toml`
- `api`: the HTTP service exposing the facade

Files and sockets are reached only through the PAL from integer_base.
*/

pub mod api;
pub mod cache;
pub mod calculator;
pub mod config;
pub mod domain;
pub mod facade;
pub mod fibonacci;
pub mod happy;
pub mod sequence;

pub use api::{ApiService, start_api_server};
pub use cache::{CacheHandle, ClassificationStore, InMemoryClassificationStore, Verdict};
pub use calculator::SequenceCalculator;
pub use config::{CONFIG_FILE_NAME, Config, load_config};
pub use domain::{SequenceElement, SequenceList};
pub use facade::SequenceFacade;
pub use fibonacci::{FibonacciCalculator, FibonacciIter};
pub use happy::{HappyNumberCalculator, HappyNumbers, classify};
pub use sequence::{SequenceKind, SequenceValue};
