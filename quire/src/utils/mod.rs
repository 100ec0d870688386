pub mod assets;
pub mod output;
pub mod posts;

pub use crate::utils::{
  assets::copy_assets,
  output::write_output,
  posts::load_entries,
};
