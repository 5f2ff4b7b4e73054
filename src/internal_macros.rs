// Implements `AbsenceMarker` with the default (never absent) behavior for each listed type.
macro_rules! impl_never_absent {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::AbsenceMarker for $ty {}
        )*
    };
}

// Implements `AbsenceMarker` for a smart pointer by asking the pointee.
macro_rules! impl_absence_forward {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: ?Sized + $crate::AbsenceMarker> $crate::AbsenceMarker for $ptr<T> {
                #[inline]
                fn is_absent(&self) -> bool {
                    T::is_absent(self)
                }
            }
        )*
    };
}
