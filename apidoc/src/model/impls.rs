//! [`Model`] implementations for standard library, `chrono`, and `serde_json` types.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;

use super::descriptor::{Primitive, Temporal, TypeDescriptor};
use super::Model;

macro_rules! impl_primitive {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Model for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Primitive(Primitive::$kind)
                }
            }
        )+
    };
}

impl_primitive!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_primitive!(Number => f32, f64);
impl_primitive!(Boolean => bool);
impl_primitive!(String => String, char, &'static str, Cow<'static, str>, chrono::NaiveTime);
impl_primitive!(Any => serde_json::Value);
impl_primitive!(Map => serde_json::Map<String, serde_json::Value>);

macro_rules! impl_sequence {
    ($($container:ident),+ $(,)?) => {
        $(
            impl<T: Model> Model for $container<T> {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Array(Box::new(T::descriptor()))
                }
            }
        )+
    };
}

impl_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Model, S: 'static> Model for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Array(Box::new(T::descriptor()))
    }
}

impl<T: Model, const N: usize> Model for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Array(Box::new(T::descriptor()))
    }
}

macro_rules! impl_pointer {
    ($($container:ident),+ $(,)?) => {
        $(
            impl<T: Model> Model for $container<T> {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Pointer(Box::new(T::descriptor()))
                }
            }
        )+
    };
}

impl_pointer!(Option, Box, Rc, Arc);

impl<K: 'static, V: 'static, S: 'static> Model for HashMap<K, V, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(Primitive::Map)
    }
}

impl<K: 'static, V: 'static> Model for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(Primitive::Map)
    }
}

macro_rules! impl_temporal {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Model for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Temporal(Temporal::$kind)
                }
            }
        )+
    };
}

impl_temporal!(DateTime => chrono::NaiveDateTime, std::time::SystemTime);
impl_temporal!(Date => chrono::NaiveDate);
impl_temporal!(Duration => std::time::Duration, chrono::Duration);

impl<Tz: chrono::TimeZone + 'static> Model for chrono::DateTime<Tz> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Temporal(Temporal::DateTime)
    }
}

impl Model for () {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ignored("unit")
    }
}

impl<T: ?Sized + 'static> Model for PhantomData<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ignored("phantom")
    }
}

impl<T: 'static> Model for Sender<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ignored("channel")
    }
}

impl<T: 'static> Model for SyncSender<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ignored("channel")
    }
}

impl<T: 'static> Model for Receiver<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ignored("channel")
    }
}

impl<R: 'static> Model for fn() -> R {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ignored("function")
    }
}
