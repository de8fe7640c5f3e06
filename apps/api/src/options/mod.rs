// Option catalogs: shared defaults and the quotation pool (loaded once),
// plus per-user custom options.

pub mod catalog;
pub mod handlers;
pub mod store;
