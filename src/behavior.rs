use std::any::Any;
use std::sync::Arc;

use crate::value::Value;

/// The capability a registered behavior must provide: accept opaque
/// argument values, produce opaque results, and expose its shape.
///
/// Plain closures get adapted through [`IntoBehavior`]; implementing this
/// trait directly is only needed for callables whose shape cannot be
/// described by a fixed `Fn` signature.
pub trait Invokable: Send + Sync {
    /// Number of fixed (non-variadic) parameters.
    fn arity(&self) -> usize;

    /// Whether the callable accepts a variadic tail after its fixed
    /// parameters.
    fn is_variadic(&self) -> bool {
        false
    }

    fn invoke(&self, args: Vec<Value>) -> Vec<Value>;
}

/// One registered stand-in for a single method call.
///
/// Cheap to clone: `register_n` enqueues the same callable several times,
/// and the method registry clones the selected behavior out of its lock
/// before invoking it.
#[derive(Clone)]
pub struct Behavior(Arc<dyn Invokable>);

impl Behavior {
    pub fn new(invokable: impl Invokable + 'static) -> Self {
        Self(Arc::new(invokable))
    }

    /// Adapts a closure whose last parameter is a variadic [`Rest`] tail.
    ///
    /// ```
    /// use dynamok::{args, Behavior, Mock, Rest};
    ///
    /// let mock = Mock::new("Summer");
    /// mock.register(
    ///     "Sum",
    ///     Behavior::variadic(|nums: Rest| {
    ///         (nums.into_iter().map(|n| n.cast::<i32>()).sum::<i32>(),)
    ///     }),
    /// );
    ///
    /// let mut results = mock.call("Sum", args![1, 2, 3]).unwrap();
    /// assert_eq!(6, results.remove(0).cast::<i32>());
    /// ```
    pub fn variadic<F, Marker>(func: F) -> Self
    where
        F: IntoVariadicBehavior<Marker>,
    {
        func.into_variadic_behavior()
    }

    pub fn arity(&self) -> usize {
        self.0.arity()
    }

    pub fn is_variadic(&self) -> bool {
        self.0.is_variadic()
    }

    pub fn invoke(&self, args: Vec<Value>) -> Vec<Value> {
        self.0.invoke(args)
    }
}

/// The trailing variadic arguments of a behavior, one [`Value`] per
/// argument.
pub struct Rest(pub Vec<Value>);

impl IntoIterator for Rest {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Rest {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Conversion of a callable into a [`Behavior`].
///
/// Implemented for `Fn` closures of arity 0 through 6 whose parameters are
/// `Any + Send` and whose return type is an [`IntoResults`] tuple. `Marker`
/// is the `fn(..) -> Ret` signature and only exists to keep the blanket
/// impls coherent.
pub trait IntoBehavior<Marker> {
    fn into_behavior(self) -> Behavior;
}

impl IntoBehavior<()> for Behavior {
    fn into_behavior(self) -> Behavior {
        self
    }
}

/// Conversion of a variadic callable into a [`Behavior`], used through
/// [`Behavior::variadic`]. Implemented for `Fn` closures with 0 through 6
/// fixed parameters followed by a [`Rest`] tail.
pub trait IntoVariadicBehavior<Marker> {
    fn into_variadic_behavior(self) -> Behavior;
}

/// Behavior return types: the unit tuple or a tuple of 1 through 4 owned
/// outputs, adapted back into opaque result values.
pub trait IntoResults {
    fn into_results(self) -> Vec<Value>;
}

impl IntoResults for () {
    fn into_results(self) -> Vec<Value> {
        Vec::new()
    }
}

macro_rules! impl_into_results {
    ($($index:tt $ret:ident),+) => {
        impl<$($ret: Any + Send),+> IntoResults for ($($ret,)+) {
            fn into_results(self) -> Vec<Value> {
                vec![$(Value::new(self.$index)),+]
            }
        }
    };
}

impl_into_results!(0 R0);
impl_into_results!(0 R0, 1 R1);
impl_into_results!(0 R0, 1 R1, 2 R2);
impl_into_results!(0 R0, 1 R1, 2 R2, 3 R3);

struct Adapted {
    arity: usize,
    variadic: bool,
    func: Box<dyn Fn(Vec<Value>) -> Vec<Value> + Send + Sync>,
}

impl Invokable for Adapted {
    fn arity(&self) -> usize {
        self.arity
    }

    fn is_variadic(&self) -> bool {
        self.variadic
    }

    fn invoke(&self, args: Vec<Value>) -> Vec<Value> {
        (self.func)(args)
    }
}

/// Fills the variadic slot from the arguments left over after the fixed
/// parameters. A sole trailing sequence value is spread into individual
/// arguments, so a wrapper can forward its own variadic parameters without
/// re-boxing; a forwarded `Rest` passes through as-is.
fn variadic_tail(mut tail: Vec<Value>) -> Rest {
    if tail.len() == 1 {
        let last = tail.remove(0);
        return match last.downcast::<Vec<Value>>() {
            Ok(seq) => Rest(seq),
            Err(last) => match last.downcast::<Rest>() {
                Ok(rest) => rest,
                Err(last) => Rest(vec![last]),
            },
        };
    }
    Rest(tail)
}

#[track_caller]
fn check_arity(expected: usize, variadic: bool, actual: usize) {
    let enough = if variadic {
        actual >= expected
    } else {
        actual == expected
    };
    if !enough {
        let at_least = if variadic { "at least " } else { "" };
        panic!("behavior takes {at_least}{expected} argument(s), {actual} supplied");
    }
}

macro_rules! impl_into_behavior {
    ($arity:tt $(, $Arg:ident)*) => {
        impl<Func, Ret $(, $Arg)*> IntoBehavior<fn($($Arg),*) -> Ret> for Func
        where
            Func: Fn($($Arg),*) -> Ret + Send + Sync + 'static,
            Ret: IntoResults,
            $($Arg: Any + Send,)*
        {
            fn into_behavior(self) -> Behavior {
                Behavior::new(Adapted {
                    arity: $arity,
                    variadic: false,
                    func: Box::new(move |args: Vec<Value>| {
                        check_arity($arity, false, args.len());
                        #[allow(unused_mut, unused_variables)]
                        let mut args = args.into_iter();
                        self($(args.next().map(Value::cast::<$Arg>).unwrap()),*)
                            .into_results()
                    }),
                })
            }
        }

        impl<Func, Ret $(, $Arg)*> IntoVariadicBehavior<fn($($Arg,)* Rest) -> Ret> for Func
        where
            Func: Fn($($Arg,)* Rest) -> Ret + Send + Sync + 'static,
            Ret: IntoResults,
            $($Arg: Any + Send,)*
        {
            fn into_variadic_behavior(self) -> Behavior {
                Behavior::new(Adapted {
                    arity: $arity,
                    variadic: true,
                    func: Box::new(move |mut args: Vec<Value>| {
                        check_arity($arity, true, args.len());
                        let rest = variadic_tail(args.split_off($arity));
                        #[allow(unused_mut, unused_variables)]
                        let mut args = args.into_iter();
                        self($(args.next().map(Value::cast::<$Arg>).unwrap(),)* rest)
                            .into_results()
                    }),
                })
            }
        }
    };
}

impl_into_behavior!(0);
impl_into_behavior!(1, A0);
impl_into_behavior!(2, A0, A1);
impl_into_behavior!(3, A0, A1, A2);
impl_into_behavior!(4, A0, A1, A2, A3);
impl_into_behavior!(5, A0, A1, A2, A3, A4);
impl_into_behavior!(6, A0, A1, A2, A3, A4, A5);
