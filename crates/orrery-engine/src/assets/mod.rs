pub mod system_def;
