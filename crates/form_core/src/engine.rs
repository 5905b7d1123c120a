//! Adapter seam for the external text transformation engine.

use std::sync::Arc;

use shared::{domain::Flags, error::EngineError};

/// The one capability the form needs from a transformation engine.
///
/// Implementations are expected to be deterministic and free of observable side
/// effects. The form does not validate the returned string.
pub trait TransformEngine {
    fn transform(&self, input: &str, flags: Flags) -> Result<String, EngineError>;
}

impl<E: TransformEngine + ?Sized> TransformEngine for Arc<E> {
    fn transform(&self, input: &str, flags: Flags) -> Result<String, EngineError> {
        (**self).transform(input, flags)
    }
}

impl<E: TransformEngine + ?Sized> TransformEngine for Box<E> {
    fn transform(&self, input: &str, flags: Flags) -> Result<String, EngineError> {
        (**self).transform(input, flags)
    }
}

/// Wraps a plain function or closure as an engine.
pub struct FnEngine<F>(pub F);

impl<F> TransformEngine for FnEngine<F>
where
    F: Fn(&str, Flags) -> Result<String, EngineError>,
{
    fn transform(&self, input: &str, flags: Flags) -> Result<String, EngineError> {
        (self.0)(input, flags)
    }
}

pub struct PassthroughEngine;

impl TransformEngine for PassthroughEngine {
    fn transform(&self, input: &str, _flags: Flags) -> Result<String, EngineError> {
        Ok(input.to_owned())
    }
}

/// Adds a fixed leading phrase when `prepend` is set and a fixed trailing phrase
/// when `append` is set. The body text passes through untouched.
#[derive(Debug, Clone)]
pub struct AffixEngine {
    prefix: String,
    suffix: String,
}

impl AffixEngine {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl TransformEngine for AffixEngine {
    fn transform(&self, input: &str, flags: Flags) -> Result<String, EngineError> {
        let mut out = String::with_capacity(self.prefix.len() + input.len() + self.suffix.len());
        if flags.prepend {
            out.push_str(&self.prefix);
        }
        out.push_str(input);
        if flags.append {
            out.push_str(&self.suffix);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: Flags = Flags {
        prepend: true,
        append: true,
    };

    #[test]
    fn passthrough_ignores_flags() {
        let out = PassthroughEngine.transform("good morrow", BOTH).expect("transform");
        assert_eq!(out, "good morrow");
    }

    #[test]
    fn affix_engine_honours_each_flag() {
        let engine = AffixEngine::new("Hark! ", " Huzzah!");

        let cases = [
            (true, true, "Hark! hello Huzzah!"),
            (true, false, "Hark! hello"),
            (false, true, "hello Huzzah!"),
            (false, false, "hello"),
        ];
        for (prepend, append, expected) in cases {
            let out = engine
                .transform("hello", Flags { prepend, append })
                .expect("transform");
            assert_eq!(out, expected, "prepend={prepend} append={append}");
        }
    }

    #[test]
    fn fn_engine_forwards_faults() {
        let engine = FnEngine(|_: &str, _: Flags| -> Result<String, EngineError> {
            Err(EngineError::rejected("nay"))
        });
        let err = engine.transform("x", BOTH).expect_err("fault");
        assert_eq!(err.message, "nay");
    }

    #[test]
    fn shared_engines_delegate() {
        let engine: Arc<dyn TransformEngine> = Arc::new(AffixEngine::new("<", ">"));
        assert_eq!(engine.transform("a", BOTH).expect("transform"), "<a>");

        let boxed: Box<dyn TransformEngine> = Box::new(PassthroughEngine);
        assert_eq!(boxed.transform("a", BOTH).expect("transform"), "a");
    }
}
