use super::*;

mod lookdict;
pub use lookdict::Lookdict;

mod setitem;
pub use setitem::SetItem;

mod delitem;
pub use delitem::DelItem;

mod resize;
pub use resize::Resize;
