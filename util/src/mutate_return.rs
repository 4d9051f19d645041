/// Turns a closure mutating an accumulator into a closure suitable for `Iterator::fold`.
#[macro_export]
macro_rules! mutate_return {
    ($f: expr) => {
        |t, a0| $crate::mutate_return::TMutateReturnSelf::mutate_return(t, $f, a0)
    };
}

pub trait TMutateReturnSelf: Sized {
    fn mutate_return<A0, F: FnMut(&mut Self, A0)>(mut self, mut f: F, a0: A0) -> Self {
        f(&mut self, a0);
        self
    }
}
impl<T: Sized> TMutateReturnSelf for T {}

#[test]
fn test_mutate_return() {
    let vecn = [3, 1, 2].iter().fold(
        Vec::new(),
        mutate_return!(|vecn: &mut Vec<i32>, n: &i32| vecn.push(n*2)),
    );
    assert_eq!(vecn, vec![6, 2, 4]);
}
