// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Shared visual constants for the snackbar and the demo shell.

## Organization

- **Palette**: Base colors
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Typography**: Font size scale
- **Shadow**: Shadow definitions

## Examples

```
use iced_snackbar::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let scrim = Color {
    a: opacity::SHADOW,
    ..palette::BLACK
};

let padding = spacing::LG; // 24px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    /// Drop shadow under the snackbar bar
    pub const SHADOW: f32 = 0.4;
    /// Action button while pressed
    pub const PRESSED: f32 = 0.7;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Medium title - Demo window heading
    pub const TITLE_MD: f32 = 20.0;

    /// Standard body - Snackbar message and action label
    pub const BODY: f32 = 14.0;

    /// Average glyph advance at [`BODY`] size, as a fraction of the size.
    pub const GLYPH_WIDTH_RATIO: f32 = 0.5;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::{opacity, palette};
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    /// Snackbar bar: offset (1, 3), blur 2.
    pub const SNACKBAR: Shadow = Shadow {
        color: Color {
            a: opacity::SHADOW,
            ..palette::BLACK
        },
        offset: Vector { x: 1.0, y: 3.0 },
        blur_radius: 2.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::SHADOW > 0.0 && opacity::SHADOW < 1.0);
    assert!(opacity::PRESSED > 0.0 && opacity::PRESSED < 1.0);

    assert!(typography::TITLE_MD > typography::BODY);
    assert!(typography::GLYPH_WIDTH_RATIO > 0.0);
};
