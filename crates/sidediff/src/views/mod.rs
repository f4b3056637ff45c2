//! View rendering modules

mod split;

pub use split::render_split;
pub(crate) use split::display_text;

#[cfg(test)]
mod tests;
