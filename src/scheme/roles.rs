//! The canonical role table
//!
//! Both platforms serialize cursor roles positionally, so the order here is
//! load-bearing: the index of a role in [`CursorRole::ALL`] is its column in
//! the Windows `[Scheme.Reg]` field list, and the table row carries the
//! matching X11 filename.

/// Number of canonical cursor roles. Every positional serialization has
/// exactly this many slots.
pub const ROLE_COUNT: usize = 21;

/// One canonical logical pointer shape, shared across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorRole {
    /// Normal select
    Arrow,
    /// Help select
    Help,
    /// Working in background
    Working,
    /// Busy
    Busy,
    /// Precision select
    Cross,
    /// Text select
    TextBeam,
    /// Handwriting
    Pen,
    /// Unavailable
    Unavailable,
    /// Vertical resize
    ResizeVertical,
    /// Horizontal resize
    ResizeHorizontal,
    /// Diagonal resize (NW-SE)
    ResizeDiagonal1,
    /// Diagonal resize (NE-SW)
    ResizeDiagonal2,
    /// Move
    Move,
    /// Alternate select
    Alternate,
    /// Link select
    Hand,
    /// Location select
    Pin,
    /// Person select
    Person,
    /// Vertical text select (no Windows equivalent)
    VerticalText,
    /// Zoom in (no Windows equivalent)
    ZoomIn,
    /// Zoom out (no Windows equivalent)
    ZoomOut,
    /// Wayland compositor default (no Windows equivalent)
    WaylandCursor,
}

/// Static per-role data: both platform names, completion behavior and the
/// alias filenames bound to the canonical file in a generated theme.
#[derive(Debug)]
pub struct RoleSpec {
    /// Value name under `HKCU\Control Panel\Cursors` (native-A field name)
    pub registry_value: &'static str,
    /// Filename inside a theme's `cursors/` directory (native-B name)
    pub theme_file: &'static str,
    /// True for roles with no converter equivalent; these are always
    /// materialized from the bundled completion assets, never converted.
    pub completion: bool,
    /// Alias filenames linked to the canonical file
    pub aliases: &'static [&'static str],
}

static ROLE_TABLE: [RoleSpec; ROLE_COUNT] = [
    RoleSpec {
        registry_value: "Arrow",
        theme_file: "left_ptr",
        completion: false,
        aliases: &["default", "arrow", "top_left_arrow"],
    },
    RoleSpec {
        registry_value: "Help",
        theme_file: "help",
        completion: false,
        aliases: &["question_arrow", "whats_this", "left_ptr_help"],
    },
    RoleSpec {
        registry_value: "AppStarting",
        theme_file: "progress",
        completion: false,
        aliases: &["left_ptr_watch", "half-busy"],
    },
    RoleSpec {
        registry_value: "Wait",
        theme_file: "wait",
        completion: false,
        aliases: &["watch"],
    },
    RoleSpec {
        registry_value: "Crosshair",
        theme_file: "cross",
        completion: false,
        aliases: &["crosshair", "tcross"],
    },
    RoleSpec {
        registry_value: "IBeam",
        theme_file: "text",
        completion: false,
        aliases: &["xterm", "ibeam"],
    },
    RoleSpec {
        registry_value: "NWPen",
        theme_file: "pencil",
        completion: false,
        aliases: &["draft"],
    },
    RoleSpec {
        registry_value: "No",
        theme_file: "not-allowed",
        completion: false,
        aliases: &["crossed_circle", "forbidden", "circle"],
    },
    RoleSpec {
        registry_value: "SizeNS",
        theme_file: "size_ver",
        completion: false,
        aliases: &["sb_v_double_arrow", "v_double_arrow", "ns-resize"],
    },
    RoleSpec {
        registry_value: "SizeWE",
        theme_file: "size_hor",
        completion: false,
        aliases: &["sb_h_double_arrow", "h_double_arrow", "ew-resize"],
    },
    RoleSpec {
        registry_value: "SizeNWSE",
        theme_file: "size_fdiag",
        completion: false,
        aliases: &["bd_double_arrow", "nwse-resize"],
    },
    RoleSpec {
        registry_value: "SizeNESW",
        theme_file: "size_bdiag",
        completion: false,
        aliases: &["fd_double_arrow", "nesw-resize"],
    },
    RoleSpec {
        registry_value: "SizeAll",
        theme_file: "size_all",
        completion: false,
        aliases: &["fleur", "move", "all-scroll"],
    },
    RoleSpec {
        registry_value: "UpArrow",
        theme_file: "up-arrow",
        completion: false,
        aliases: &["center_ptr"],
    },
    RoleSpec {
        registry_value: "Hand",
        theme_file: "pointer",
        completion: false,
        aliases: &["hand", "hand1", "hand2", "pointing_hand"],
    },
    RoleSpec {
        registry_value: "Pin",
        theme_file: "pin",
        completion: false,
        aliases: &[],
    },
    RoleSpec {
        registry_value: "Person",
        theme_file: "person",
        completion: false,
        aliases: &[],
    },
    RoleSpec {
        registry_value: "VerticalText",
        theme_file: "vertical-text",
        completion: true,
        aliases: &[],
    },
    RoleSpec {
        registry_value: "ZoomIn",
        theme_file: "zoom-in",
        completion: true,
        aliases: &[],
    },
    RoleSpec {
        registry_value: "ZoomOut",
        theme_file: "zoom-out",
        completion: true,
        aliases: &[],
    },
    RoleSpec {
        registry_value: "WaylandCursor",
        theme_file: "wayland-cursor",
        completion: true,
        aliases: &[],
    },
];

impl CursorRole {
    /// Every role in canonical serialization order.
    pub const ALL: [CursorRole; ROLE_COUNT] = [
        CursorRole::Arrow,
        CursorRole::Help,
        CursorRole::Working,
        CursorRole::Busy,
        CursorRole::Cross,
        CursorRole::TextBeam,
        CursorRole::Pen,
        CursorRole::Unavailable,
        CursorRole::ResizeVertical,
        CursorRole::ResizeHorizontal,
        CursorRole::ResizeDiagonal1,
        CursorRole::ResizeDiagonal2,
        CursorRole::Move,
        CursorRole::Alternate,
        CursorRole::Hand,
        CursorRole::Pin,
        CursorRole::Person,
        CursorRole::VerticalText,
        CursorRole::ZoomIn,
        CursorRole::ZoomOut,
        CursorRole::WaylandCursor,
    ];

    /// Position of this role in every positional serialization
    pub fn index(self) -> usize {
        self as usize
    }

    /// Static table row for this role
    pub fn spec(self) -> &'static RoleSpec {
        &ROLE_TABLE[self as usize]
    }

    /// Look a role up by its Windows registry value name
    pub fn from_registry_value(name: &str) -> Option<CursorRole> {
        CursorRole::ALL
            .into_iter()
            .find(|r| r.spec().registry_value.eq_ignore_ascii_case(name))
    }

    /// Look a role up by its X11 cursor filename (exact match)
    pub fn from_theme_file(name: &str) -> Option<CursorRole> {
        CursorRole::ALL
            .into_iter()
            .find(|r| r.spec().theme_file == name)
    }
}
