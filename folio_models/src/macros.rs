macro_rules! nutype_string {
    ($(#[$meta:meta])* $ident:ident($($args:tt)*)) => {
        #[::nutype::nutype(
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Hash,
                TryFrom,
                Deref,
                AsRef,
                Display,
                Serialize,
                Deserialize,
            ),
            $($args)*
        )]
        $(#[$meta])*
        pub struct $ident(String);
    };
}

pub(crate) use nutype_string;
