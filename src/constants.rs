//! Name tables driving call classification.
//!
//! Vim distinguishes expression-style builtin *functions* from
//! statement-style builtin *commands* (bare argument lists, no parens).
//! Classification unions these tables: a name counts as a builtin function
//! when it appears in `BUILTIN_FUNCTIONS` or `BUILTIN_COMMANDS`, and as a
//! builtin command when it appears in `BUILTIN_COMMANDS`, `RIML_COMMANDS`,
//! or `VIML_COMMANDS`.

/// Vim builtin functions callable with parenthesized argument lists.
pub const BUILTIN_FUNCTIONS: &[&str] = &[
    "abs", "acos", "add", "append", "argc", "argidx", "argv", "asin", "atan",
    "atan2", "browse", "browsedir", "bufexists", "buflisted", "bufloaded",
    "bufname", "bufnr", "bufwinnr", "byte2line", "byteidx", "call", "ceil",
    "changenr", "char2nr", "cindent", "clearmatches", "col", "complete",
    "complete_add", "complete_check", "confirm", "copy", "cos", "cosh",
    "count", "cursor", "deepcopy", "delete", "did_filetype", "diff_filler",
    "diff_hlID", "empty", "escape", "eval", "eventhandler", "executable",
    "exists", "exp", "expand", "extend", "feedkeys", "filereadable",
    "filewritable", "filter", "finddir", "findfile", "float2nr", "floor",
    "fmod", "fnameescape", "fnamemodify", "foldclosed", "foldclosedend",
    "foldlevel", "foldtext", "foldtextresult", "foreground", "function",
    "garbagecollect", "get", "getbufline", "getbufvar", "getchar",
    "getcharmod", "getcmdline", "getcmdpos", "getcmdtype", "getcwd",
    "getfontname", "getfperm", "getfsize", "getftime", "getftype", "getline",
    "getloclist", "getmatches", "getpid", "getpos", "getqflist", "getreg",
    "getregtype", "gettabvar", "gettabwinvar", "getwinposx", "getwinposy",
    "getwinvar", "glob", "globpath", "has", "has_key", "haslocaldir",
    "hasmapto", "histadd", "histdel", "histget", "histnr", "hlexists", "hlID",
    "hostname", "iconv", "indent", "index", "input", "inputdialog",
    "inputlist", "inputrestore", "inputsave", "inputsecret", "insert",
    "isdirectory", "islocked", "items", "join", "keys", "len", "libcall",
    "libcallnr", "line", "line2byte", "lispindent", "localtime", "log",
    "log10", "map", "maparg", "mapcheck", "match", "matchadd", "matcharg",
    "matchdelete", "matchend", "matchlist", "matchstr", "max", "min", "mkdir",
    "mode", "nextnonblank", "nr2char", "pathshorten", "pow", "prevnonblank",
    "printf", "pumvisible", "range", "readfile", "reltime", "reltimestr",
    "remove", "rename", "repeat", "resolve", "reverse", "round", "search",
    "searchdecl", "searchpair", "searchpairpos", "searchpos", "setbufvar",
    "setcmdpos", "setline", "setloclist", "setmatches", "setpos", "setqflist",
    "setreg", "settabvar", "settabwinvar", "setwinvar", "shellescape",
    "simplify", "sin", "sinh", "sort", "soundfold", "spellbadword",
    "spellsuggest", "split", "sqrt", "str2float", "str2nr", "strchars",
    "strdisplaywidth", "strftime", "stridx", "string", "strlen", "strpart",
    "strridx", "strtrans", "strwidth", "submatch", "substitute", "synID",
    "synIDattr", "synIDtrans", "synstack", "system", "tabpagebuflist",
    "tabpagenr", "tabpagewinnr", "tagfiles", "taglist", "tan", "tanh",
    "tempname", "tolower", "toupper", "tr", "trunc", "type", "undofile",
    "undotree", "values", "virtcol", "visualmode", "winbufnr", "wincol",
    "winheight", "winline", "winnr", "winrestcmd", "winrestview",
    "winsaveview", "winwidth", "writefile",
];

/// Vim builtins invoked statement-style (bare arguments, no parens).
pub const BUILTIN_COMMANDS: &[&str] = &[
    "echo", "echon", "echohl", "echomsg", "echoerr", "execute", "normal",
    "silent", "sleep", "throw",
];

/// riml's own include/source directives.
pub const RIML_COMMANDS: &[&str] = &["riml_include", "riml_source"];

/// Vim ex-commands the source language passes through by name.
pub const VIML_COMMANDS: &[&str] = &[
    "augroup", "autocmd", "command", "comclear", "delcommand", "delfunction",
    "highlight", "mapclear", "redir", "runtime", "set", "setlocal", "sign",
    "source", "syntax",
];

/// Comparison operators that accept Vim's `#` / `?` case-sensitivity
/// suffixes.
pub const IGNORECASE_CAPABLE_OPERATORS: &[&str] =
    &["==", "!=", "=~", "!~", ">", ">=", "<", "<="];

/// Indent unit used by block-introducing nodes.
pub const INDENT_UNIT: &str = "  ";

/// True when `name` can be emitted as an expression-style builtin call.
pub fn is_builtin_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name) || BUILTIN_COMMANDS.contains(&name)
}

/// True when `name` must be emitted as a statement-style builtin command.
pub fn is_builtin_command(name: &str) -> bool {
    BUILTIN_COMMANDS.contains(&name)
        || RIML_COMMANDS.contains(&name)
        || VIML_COMMANDS.contains(&name)
}
