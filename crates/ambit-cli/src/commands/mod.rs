pub mod declare;
pub mod version;
pub mod workspaces;
