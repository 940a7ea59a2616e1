pub mod table_view;

pub use table_view::{ActionView, Notice, NoticeKind, TableView, VisibleCard};
