#[cfg(debug_assertions)]
#[macro_export]
macro_rules! if_dbg_else {({$($tt_dbg: tt)*}{$($tt_else: tt)*}) => {
    $($tt_dbg)*
}}
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! if_dbg_else {({$($tt_dbg: tt)*}{$($tt_else: tt)*}) => {
    $($tt_else)*
}}

#[macro_export]
macro_rules! if_then_some {
    ($cond: expr, $val: expr) => {
        if $cond {
            Some($val)
        } else {
            None
        }
    };
    (let $pattern:pat = $expr: expr, $val: expr) => {
        if let $pattern = $expr {
            Some($val)
        } else {
            None
        }
    };
}

#[test]
fn test_if_then() {
    assert_eq!(if_then_some!(1<2, "a"), Some("a"));
    assert_eq!(if_then_some!(2<1, "a"), None);
    assert_eq!(if_then_some!(let Some(n)=Some(3), n+1), Some(4));
    assert_eq!(if_then_some!(let Ok(n)=Err::<i32, ()>(()), n), None);
}
