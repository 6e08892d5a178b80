/// Trait for types that can detect 'almost-collisions' between `Self` and `T`.
///
/// Touching boundaries do not count as a collision: two zones sharing a wall are fine.
/// Due to floating point arithmetic precision, two objects that are very close to each other need a tolerance.
/// This trait errs on the side of false negatives: overlaps thinner than the
/// tolerance of [`FPA`](crate::util::FPA) are ignored.
pub trait AlmostCollidesWith<T> {
    fn almost_collides_with(&self, other: &T) -> bool;
}
