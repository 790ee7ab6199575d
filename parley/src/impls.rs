/*!
Implementations of the [`parameter`][crate::parameter] traits for various
primitive and standard library types
 */

use crate::parameter::ParsedValue;

macro_rules! from_str {
    ($($type:ident $(:: $path:ident)*,)*) => {
        $(
            impl ParsedValue for $type $(:: $path)* {}
        )*
    };
}

from_str! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    bool,
    char,

    std::string::String,
    std::path::PathBuf,

    core::net::Ipv4Addr,
    core::net::Ipv6Addr,
    core::net::IpAddr,
    core::net::SocketAddrV4,
    core::net::SocketAddrV6,
    core::net::SocketAddr,
}
