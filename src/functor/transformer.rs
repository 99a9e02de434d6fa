use super::Predicate;

/// Turns an input into an output, consuming the input.
pub trait Transformer<I, O> {
    fn transform(&self, input: I) -> O;
}

impl<I, O, F> Transformer<I, O> for F
where
    F: Fn(I) -> O,
{
    fn transform(&self, input: I) -> O {
        self(input)
    }
}

/// Ignores its input and yields clones of a fixed value.
pub fn constant<I, O: Clone>(output: O) -> impl Transformer<I, O> {
    move |_: I| output.clone()
}

/// Clones a borrowed value into an owned one.
pub fn cloning<T: Clone>() -> impl for<'a> Transformer<&'a T, T> {
    |input: &T| input.clone()
}

/// Passes the input through untouched.
pub fn identity<T>() -> impl Transformer<T, T> {
    |input: T| input
}

/// Feeds the output of `first` into `second`.
pub fn chained<I, M, O>(
    first: impl Transformer<I, M>,
    second: impl Transformer<M, O>,
) -> impl Transformer<I, O> {
    move |input: I| second.transform(first.transform(input))
}

/// Routes input through one of two transformers, chosen by a predicate.
pub fn switched<I, O>(
    condition: impl Predicate<I>,
    on_true: impl Transformer<I, O>,
    on_false: impl Transformer<I, O>,
) -> impl Transformer<I, O> {
    move |input: I| {
        if condition.evaluate(&input) {
            on_true.transform(input)
        } else {
            on_false.transform(input)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn chains_left_to_right() {
        let t = chained(|v: i32| v + 1, |v: i32| v * 10);
        assert_eq!(t.transform(4), 50);
    }

    #[test]
    fn switches_on_the_predicate() {
        let t = switched(|v: &i32| *v < 0, |v: i32| -v, |v: i32| v);
        assert_eq!(t.transform(-3), 3);
        assert_eq!(t.transform(3), 3);
    }

    #[test]
    fn constants_and_clones() {
        let t = constant::<i32, _>("fixed");
        assert_eq!(t.transform(1), "fixed");
        assert_eq!(t.transform(2), "fixed");

        let c = cloning::<String>();
        let source = "owned".to_owned();
        assert_eq!(c.transform(&source), "owned");
        assert_eq!(identity::<i32>().transform(9), 9);
    }
}
