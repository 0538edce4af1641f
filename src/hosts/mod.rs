pub mod r#impl;
