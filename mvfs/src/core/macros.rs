// SPDX-License-Identifier: MIT

/// Generates the `From` conversions between the layered error enums.
///
/// ```text
/// top      => FsError { Sub: Variant, .. }   Sub -> FsError::Variant
/// str_into => [ Sub, .. ]                   &'static str -> Sub::Other, FsError::Other
/// sub      => { Src => [ Dst::Variant, .. ] } Src -> Dst::Variant
/// ```
#[macro_export]
macro_rules! fs_error_wiring {
    (
        top => $top:ident {
            $($top_src:ty : $top_variant:ident),+ $(,)?
        },
        str_into => [ $($str_tgt:ty),* $(,)? ],
        sub => {
            $($src_sub:ty => [ $($dst_sub:ident::$dst_variant:ident),+ ] ),* $(,)?
        } $(,)?
    ) => {
        $crate::__mvfs_wrap_into!{ $( $top_src => [ $top::$top_variant ] ),+ }
        $crate::__mvfs_str_into!{ $top $(, $str_tgt)* }
        $crate::__mvfs_wrap_into!{ $( $src_sub => [ $( $dst_sub::$dst_variant ),+ ] ),* }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mvfs_wrap_into {
    ($($src:ty => [ $( $dst:ident::$variant:ident ),+ ] ),* $(,)?) => {
        $($(
            impl From<$src> for $dst {
                #[inline]
                fn from(e: $src) -> Self {
                    <$dst>::$variant(e)
                }
            }
        )+)*
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mvfs_str_into {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<&'static str> for $t {
                #[inline]
                fn from(msg: &'static str) -> Self {
                    <$t>::Other(msg)
                }
            }
        )+
    };
}

/// Returns `Err($err.into())` unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// Returns `Err($err.into())`.
#[macro_export]
macro_rules! bail {
    ($err:expr $(,)?) => {
        return Err($err.into())
    };
}
