mod common;
mod tabs;
