/// Default `settings.conf` written on first run. Every value is commented out so the
/// built-in defaults apply until the user edits the file.
pub(crate) const SETTINGS_SKELETON_CONTENT: &str = "# Casebook settings\n\
#\n\
# Format: key = value. Lines starting with '#' or '//' are comments.\n\
#\n\
# ---------- Data ----------\n\
# Dataset file (JSON array of records). Relative paths resolve against this directory.\n\
# dataset_path = records.json\n\
#\n\
# Key under which favorites are stored (file lists/<key>.json).\n\
# favorites_key = favorites\n\
#\n\
# ---------- Behaviour ----------\n\
# How long transient status messages stay visible, in milliseconds.\n\
# status_duration_ms = 4000\n\
# Duration of the detail panel's open transition, in milliseconds.\n\
# panel_transition_ms = 300\n\
#\n\
# ---------- Appearance ----------\n\
# Category palette, assigned in first-seen category order (padded to 10 with #777777).\n\
# category_colors = #89b4fa, #a6e3a1, #f9e2af, #f38ba8, #cba6f7\n\
# Icons per category (repeat the line for each category).\n\
# category_icon = Assessment => 📊\n\
# default_icon = ✨\n\
# show_keybinds_footer = true\n\
#\n\
# ---------- Keybinds ----------\n\
# The first line for an action replaces its defaults; further lines add chords.\n\
# keybind_quit = Ctrl+C\n\
# keybind_focus_search = Ctrl+F\n\
# keybind_toggle_favorites_view = Ctrl+V\n\
# keybind_toggle_favorite = Ctrl+S\n\
# keybind_close_panel = Esc\n\
# keybind_next_card = Down\n\
# keybind_prev_card = Up\n\
# keybind_activate = Enter\n\
# keybind_cycle_focus = Tab\n";
