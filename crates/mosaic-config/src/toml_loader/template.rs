//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Mosaic Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[shell]
# program = ""            # empty: $SHELL (Unix) or %COMSPEC% (Windows)
# args = []
# working_directory = "~/src"
# login_shell = true

[shell.env]
# EDITOR = "nvim"

[workspace]
# width = 1920            # 200-16384
# height = 1080           # 150-16384
# cell_width = 8          # 1-64
# cell_height = 16        # 1-128
# event_capacity = 1024   # 16-65536

[panes]
# title = "Terminal"
# x = 0
# y = 0
# width = 800             # raised to 200 if smaller
# height = 600            # raised to 150 if smaller
# history_limit = 100     # 0-10000
# output_buffer_bytes = 262144

[process]
# terminate_grace_ms = 500   # 0-30000
# close_timeout_ms = 2000    # 100-60000, >= terminate_grace_ms + 1000

[interaction]
# frame_interval_ms = 16  # 1-1000
# edge_margin = 6         # 1-32
# title_bar_height = 28   # 0-200

[layouts]
# directory = "/path/to/layouts"

[logging]
# level = "INFO"          # TRACE, DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
