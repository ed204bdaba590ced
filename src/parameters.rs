mod cleanup;

pub use self::cleanup::Cleanup;
