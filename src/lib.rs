#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use pw_access as access;
pub use pw_reflect as reflect;
pub use pw_utils as utils;
