pub mod test;
pub mod windows;
