pub mod panels;
pub mod table;
pub mod tabs;
