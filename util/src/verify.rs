use std::fmt::Debug;

pub trait TVerifiableByVerifyMacro {
    fn is_verify_true(&self) -> bool;
}

impl TVerifiableByVerifyMacro for bool {
    fn is_verify_true(&self) -> bool {
        *self
    }
}

impl<T> TVerifiableByVerifyMacro for Option<T> {
    fn is_verify_true(&self) -> bool {
        self.is_some()
    }
}

impl<T: TVerifiableByVerifyMacro> TVerifiableByVerifyMacro for &T {
    fn is_verify_true(&self) -> bool {
        T::is_verify_true(self)
    }
}

impl<TOk, TErr> TVerifiableByVerifyMacro for Result<TOk, TErr> {
    fn is_verify_true(&self) -> bool {
        self.is_ok()
    }
}

pub fn verify_internal<E: TVerifiableByVerifyMacro+Debug>(e: E, str_e: &str) -> E {
    assert!(e.is_verify_true(), "verify!({}): {:?}", str_e, e);
    e
}

/// Extracts the payload of an `Option` or `Result` whose failure case is known to be impossible.
/// Panics with the stringified expression otherwise.
pub trait TUnwrapByUnwrapMacro {
    type Output;
    fn unwrap_internal(self, str_e: &str) -> Self::Output;
}

impl<T> TUnwrapByUnwrapMacro for Option<T> {
    type Output = T;
    fn unwrap_internal(self, str_e: &str) -> T {
        match self {
            Some(t) => t,
            None => panic!("unwrap!({}): None", str_e),
        }
    }
}

impl<T, E: Debug> TUnwrapByUnwrapMacro for Result<T, E> {
    type Output = T;
    fn unwrap_internal(self, str_e: &str) -> T {
        match self {
            Ok(t) => t,
            Err(e) => panic!("unwrap!({}): {:?}", str_e, e),
        }
    }
}

#[macro_export]
macro_rules! verify {($e: expr) => {{
    $crate::verify::verify_internal($e, stringify!($e))
}}}

#[macro_export]
macro_rules! unwrap {($e: expr) => {{
    $crate::verify::TUnwrapByUnwrapMacro::unwrap_internal($e, stringify!($e))
}}}

#[test]
fn test_verify() {
    verify!(Some(4));
    assert_eq!(unwrap!(Some(5)), 5);
    assert_eq!(unwrap!(Ok::<_, ()>(6)), 6);
}

#[test]
#[should_panic(expected = "unwrap!(None::<u8>)")]
fn test_unwrap_none_panics() {
    unwrap!(None::<u8>);
}
