// wledit-cli: desktop front end over the WLEditor engine
//
// Batch-style commands (find, replace, key replay, wrap preview) plus the
// preferences store shared with the editor.

pub mod commands;
pub mod script;
