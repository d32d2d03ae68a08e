use raster::Rgba;

/// Dark coffee background, `#2B1B17`.
pub const COFFEE: Rgba = Rgba::rgb(43, 27, 23);
/// Gold foreground, `#D4AF37`.
pub const GOLD: Rgba = Rgba::rgb(212, 175, 55);
/// Matte black, `#1A1A1A`.
pub const MATTE: Rgba = Rgba::rgb(26, 26, 26);
/// Cream, `#F5F5DC`.
pub const CREAM: Rgba = Rgba::rgb(245, 245, 220);
/// Terracotta, `#A0522D`.
pub const TERRACOTTA: Rgba = Rgba::rgb(160, 82, 45);

pub const WHITE: Rgba = Rgba::WHITE;
pub const CLEAR: Rgba = Rgba::TRANSPARENT;
/// Transparent white, used as the clear colour for white artwork so
/// resamplers that ignore alpha do not pull edges towards black.
pub const CLEAR_WHITE: Rgba = Rgba::new(255, 255, 255, 0);
