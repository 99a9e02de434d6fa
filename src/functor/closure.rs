use super::Predicate;

/// A unit of work applied to a value for its side effects.
pub trait Closure<T: ?Sized> {
    fn execute(&mut self, value: &mut T);
}

impl<T: ?Sized, F> Closure<T> for F
where
    F: FnMut(&mut T),
{
    fn execute(&mut self, value: &mut T) {
        self(value)
    }
}

/// A boxed closure, for the variadic combinators.
pub type BoxedClosure<T> = Box<dyn Closure<T>>;

/// Does nothing.
pub fn noop<T: ?Sized>() -> impl Closure<T> {
    |_: &mut T| {}
}

/// Runs each closure in order.
pub fn chained<T: ?Sized>(closures: Vec<BoxedClosure<T>>) -> impl Closure<T> {
    let mut closures = closures;
    move |value: &mut T| {
        for c in closures.iter_mut() {
            c.execute(value);
        }
    }
}

/// Runs `body` when `condition` holds, otherwise `fallback`.
pub fn conditional<T>(
    condition: impl Predicate<T>,
    body: impl Closure<T>,
    fallback: impl Closure<T>,
) -> impl Closure<T> {
    let mut body = body;
    let mut fallback = fallback;
    move |value: &mut T| {
        if condition.evaluate(value) {
            body.execute(value);
        } else {
            fallback.execute(value);
        }
    }
}

/// Runs `body` a fixed number of times.
pub fn repeated<T: ?Sized>(times: usize, body: impl Closure<T>) -> impl Closure<T> {
    let mut body = body;
    move |value: &mut T| {
        for _ in 0..times {
            body.execute(value);
        }
    }
}

/// Re-runs `body` for as long as `condition` holds.
pub fn while_true<T>(condition: impl Predicate<T>, body: impl Closure<T>) -> impl Closure<T> {
    let mut body = body;
    move |value: &mut T| {
        while condition.evaluate(value) {
            body.execute(value);
        }
    }
}

/// Applies `body` to every element of a mutable iterator.
pub fn for_all<'a, T: 'a, C: Closure<T>>(
    values: impl IntoIterator<Item = &'a mut T>,
    body: &mut C,
) {
    for value in values {
        body.execute(value);
    }
}
