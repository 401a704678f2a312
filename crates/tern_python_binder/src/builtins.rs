//! Name lists that special-case the builtins and typing stub files.

/// The documented built-in names. When the builtins stub is bound, the
/// resulting scope's export filter is set to this list: names the stub
/// defines beyond it stay in the table but are invisible to unqualified
/// lookup from other scopes.
pub(crate) const BUILTIN_EXPORTS: &[&str] = &[
    // Constants
    "Ellipsis",
    "NotImplemented",
    "__import__",
    // Functions and types
    "abs",
    "aiter",
    "all",
    "anext",
    "any",
    "ascii",
    "bin",
    "bool",
    "breakpoint",
    "bytearray",
    "bytes",
    "callable",
    "chr",
    "classmethod",
    "compile",
    "complex",
    "copyright",
    "credits",
    "delattr",
    "dict",
    "dir",
    "divmod",
    "enumerate",
    "eval",
    "exec",
    "exit",
    "filter",
    "float",
    "format",
    "frozenset",
    "getattr",
    "globals",
    "hasattr",
    "hash",
    "help",
    "hex",
    "id",
    "input",
    "int",
    "isinstance",
    "issubclass",
    "iter",
    "len",
    "license",
    "list",
    "locals",
    "map",
    "max",
    "memoryview",
    "min",
    "next",
    "object",
    "oct",
    "open",
    "ord",
    "pow",
    "print",
    "property",
    "quit",
    "range",
    "repr",
    "reversed",
    "round",
    "set",
    "setattr",
    "slice",
    "sorted",
    "staticmethod",
    "str",
    "sum",
    "super",
    "tuple",
    "type",
    "vars",
    "zip",
    // Exceptions
    "ArithmeticError",
    "AssertionError",
    "AttributeError",
    "BaseException",
    "BlockingIOError",
    "BrokenPipeError",
    "BufferError",
    "ChildProcessError",
    "ConnectionAbortedError",
    "ConnectionError",
    "ConnectionRefusedError",
    "ConnectionResetError",
    "EOFError",
    "EnvironmentError",
    "Exception",
    "FileExistsError",
    "FileNotFoundError",
    "FloatingPointError",
    "GeneratorExit",
    "IOError",
    "ImportError",
    "IndentationError",
    "IndexError",
    "InterruptedError",
    "IsADirectoryError",
    "KeyError",
    "KeyboardInterrupt",
    "LookupError",
    "MemoryError",
    "ModuleNotFoundError",
    "NameError",
    "NotADirectoryError",
    "NotImplementedError",
    "OSError",
    "OverflowError",
    "PermissionError",
    "ProcessLookupError",
    "RecursionError",
    "ReferenceError",
    "RuntimeError",
    "StopAsyncIteration",
    "StopIteration",
    "SyntaxError",
    "SystemError",
    "SystemExit",
    "TabError",
    "TimeoutError",
    "TypeError",
    "UnboundLocalError",
    "UnicodeDecodeError",
    "UnicodeEncodeError",
    "UnicodeError",
    "UnicodeTranslateError",
    "ValueError",
    "ZeroDivisionError",
    // Warnings
    "BytesWarning",
    "DeprecationWarning",
    "FutureWarning",
    "ImportWarning",
    "PendingDeprecationWarning",
    "ResourceWarning",
    "RuntimeWarning",
    "SyntaxWarning",
    "UnicodeWarning",
    "UserWarning",
    "Warning",
];

/// Names that receive a synthesized built-in declaration when assigned at
/// the top level of the typing stub, instead of an ordinary variable
/// declaration.
pub(crate) const TYPING_SPECIAL_FORMS: &[&str] = &[
    "Any",
    "Callable",
    "ChainMap",
    "ClassVar",
    "Counter",
    "DefaultDict",
    "Deque",
    "Dict",
    "Final",
    "FrozenSet",
    "Generic",
    "List",
    "Literal",
    "NoReturn",
    "Optional",
    "OrderedDict",
    "Protocol",
    "Set",
    "Tuple",
    "Type",
    "TypeVar",
    "TypedDict",
    "Union",
    "overload",
];

pub(crate) fn is_typing_special_form(name: &str) -> bool {
    TYPING_SPECIAL_FORMS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_names_are_exported() {
        for name in ["print", "object", "ValueError", "Warning", "type"] {
            assert!(BUILTIN_EXPORTS.contains(&name), "{name} should be exported");
        }
    }

    #[test]
    fn private_helpers_are_not_exported() {
        for name in ["function", "_T", "__spam__"] {
            assert!(!BUILTIN_EXPORTS.contains(&name), "{name} should be hidden");
        }
    }

    #[test]
    fn special_forms_cover_the_spelled_out_set() {
        for name in ["Any", "Union", "Optional", "Protocol", "overload", "TypeVar"] {
            assert!(is_typing_special_form(name));
        }
        assert!(!is_typing_special_form("Iterable"));
    }
}
