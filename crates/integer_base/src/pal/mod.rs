/* 📖 # What is the Platform Abstraction Layer?

The PAL hides file access and HTTP serving behind the Pal trait:
- RealPal reads from the working directory and serves with tiny_http
- MockPal keeps files in memory and dispatches requests in-process

The engine only ever sees the Pal trait and the raw HTTP types in `http`.
*/

mod file_path;
pub mod http;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle, ReadSeek};
