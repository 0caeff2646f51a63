pub mod add;
pub mod export;
pub mod list;
pub mod show;

pub use add::handle_add;
pub use export::handle_export;
pub use list::handle_list;
pub use show::handle_show;
