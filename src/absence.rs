use std::rc::Rc;
use std::sync::Arc;

/// Marks the "absent" value of a type, which can never be stored in an [`AdaptiveMap`] as either a key or a value.
///
/// Most types have no such value, and the default implementation of [`is_absent`] returns `false`, so opting a type in
/// is a one-liner:
///
/// ```
/// use adaptive_map::AbsenceMarker;
///
/// #[derive(PartialEq, Eq, Hash)]
/// struct AttributeId(u32);
///
/// impl AbsenceMarker for AttributeId {}
/// ```
///
/// Types that do carry a "nothing here" state report it: [`Option`] is absent when it is `None`, and raw pointers are
/// absent when they are null. References and the standard smart pointers ask their pointee.
///
/// [`AdaptiveMap`]: crate::AdaptiveMap
/// [`is_absent`]: AbsenceMarker::is_absent
pub trait AbsenceMarker {
    /// Returns `true` if `self` is the absent value of its type.
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

impl_never_absent!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    str,
    String,
);

impl_absence_forward!(Box, Rc, Arc);

impl<T: ?Sized + AbsenceMarker> AbsenceMarker for &T {
    #[inline]
    fn is_absent(&self) -> bool {
        T::is_absent(self)
    }
}

impl<T> AbsenceMarker for Option<T> {
    #[inline]
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T> AbsenceMarker for Vec<T> {}

impl<T> AbsenceMarker for [T] {}

impl<T, const N: usize> AbsenceMarker for [T; N] {}

impl<T: ?Sized> AbsenceMarker for *const T {
    #[inline]
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> AbsenceMarker for *mut T {
    #[inline]
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}
