mod validate;

pub use self::validate::ValidatedForm;
