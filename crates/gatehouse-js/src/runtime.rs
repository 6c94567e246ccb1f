use anyhow::Result;
use gatehouse_flags::InitFlags;

const DOCUMENT_SHIM: &str = include_str!("shim/document_shim.js");
const ASYNC_EXPR_SENTINEL: &str = "__GATEHOUSE_ASYNC_EXPR__";

/// A JS context with a `document.cookie` shim preinstalled.
pub struct Runtime {
    #[cfg(feature = "quickjs")]
    _runtime: rquickjs::Runtime,
    #[cfg(feature = "quickjs")]
    context: rquickjs::Context,
}

impl Runtime {
    pub fn new() -> Result<Self> {
        #[cfg(feature = "quickjs")]
        {
            let runtime = rquickjs::Runtime::new()?;
            let context = rquickjs::Context::full(&runtime)?;
            context.with(|ctx| ctx.eval::<(), _>(DOCUMENT_SHIM))?;
            tracing::debug!(target: "gatehouse_js", "document shim installed");
            return Ok(Self {
                _runtime: runtime,
                context,
            });
        }

        #[cfg(not(feature = "quickjs"))]
        {
            let _ = DOCUMENT_SHIM;
            Ok(Self {})
        }
    }

    pub fn backend_name(&self) -> &'static str {
        #[cfg(feature = "quickjs")]
        {
            "quickjs"
        }

        #[cfg(not(feature = "quickjs"))]
        {
            "stub"
        }
    }

    pub fn execute_script(&self, source: &str) -> Result<()> {
        #[cfg(feature = "quickjs")]
        {
            self.context.with(|ctx| ctx.eval::<(), _>(source))?;
            return Ok(());
        }

        #[cfg(not(feature = "quickjs"))]
        {
            let _ = source;
            anyhow::bail!("gatehouse-js was built without `quickjs` support")
        }
    }

    /// Evaluates `expression` and renders the result as JSON, falling back to
    /// `String(value)` for values JSON cannot express.
    pub fn eval_expression(&self, expression: &str) -> Result<String> {
        #[cfg(feature = "quickjs")]
        {
            let wrapped = format!(
                "(function() {{
                    let __gatehouse_value = ({expression});
                    let __gatehouse_is_async =
                        __gatehouse_value !== null &&
                        (typeof __gatehouse_value === 'object' || typeof __gatehouse_value === 'function') &&
                        typeof __gatehouse_value.then === 'function';
                    if (__gatehouse_is_async) {{
                        return '{ASYNC_EXPR_SENTINEL}';
                    }}
                    let __gatehouse_json = JSON.stringify(__gatehouse_value);
                    return __gatehouse_json === undefined ? String(__gatehouse_value) : __gatehouse_json;
                }})()"
            );
            let rendered = self
                .context
                .with(|ctx| ctx.eval::<String, _>(wrapped.as_str()))?;
            if rendered == ASYNC_EXPR_SENTINEL {
                anyhow::bail!("async expressions are not supported");
            }
            return Ok(rendered);
        }

        #[cfg(not(feature = "quickjs"))]
        {
            let _ = expression;
            anyhow::bail!("gatehouse-js was built without `quickjs` support")
        }
    }

    /// Current value of `document.cookie`.
    pub fn document_cookie(&self) -> Result<String> {
        #[cfg(feature = "quickjs")]
        {
            let jar = self
                .context
                .with(|ctx| ctx.eval::<String, _>("String(document.cookie)"))?;
            return Ok(jar);
        }

        #[cfg(not(feature = "quickjs"))]
        {
            anyhow::bail!("gatehouse-js was built without `quickjs` support")
        }
    }

    /// Assigns `cookie` through the `document.cookie` setter, exactly as a
    /// page script would.
    pub fn set_document_cookie(&self, cookie: &str) -> Result<()> {
        let literal = serde_json::to_string(cookie)?;
        self.execute_script(&format!("document.cookie = {literal};"))
    }

    /// Publishes `flags` as `globalThis.flags` for the application's startup
    /// code.
    pub fn install_flags(&self, flags: &InitFlags) -> Result<()> {
        let json = serde_json::to_string(flags)?;
        self.execute_script(&format!("globalThis.flags = {json};"))
    }
}
