pub mod dialog;

pub use dialog::{DialogFlags, DialogId, DialogKind, DialogModel};
