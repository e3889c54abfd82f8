/// Declares the listed modules as public and re-exports their items.
/// ```ignore
/// // code
/// make_re_export!(xxx);
/// // gen
/// pub mod xxx;
/// pub use xxx::*;
/// ```
#[macro_export]
macro_rules! make_re_export {
    ($($(#[$meta:meta])*  $mod_name:ident ),*) => {
        $($(#[$meta])* pub mod $mod_name;)*
        $($(#[$meta])* pub use self::$mod_name::*;)*
    };
}

make_re_export!(hosting, model, repository);
