use async_trait::async_trait;
use legion_core::{Error, Result};
use serde_json::Value;

use crate::probe::{Issue, Probe, ScanContext, Severity};

/// Tenta os métodos em ordem e retorna o primeiro aceito pelo node
///
/// Recusas JSON-RPC (método inexistente, sem permissão) contam como método
/// não exposto. Falhas de transporte são propagadas.
pub async fn first_accepted(
    ctx: &ScanContext<'_>,
    methods: &[&'static str],
    params: &[Value],
) -> Result<Option<(&'static str, Value)>> {
    for method in methods {
        match ctx.node.request(method, params.to_vec()).await {
            Ok(value) => return Ok(Some((*method, value))),
            Err(Error::RpcRejected { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

/// Indica se a resposta de um método mostra que ele foi executado
pub fn is_effective(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Plugin genérico: reporta quando o node executa um método sensível
pub struct MethodExposure {
    name: &'static str,
    methods: Vec<&'static str>,
    params: Vec<Value>,
    severity: Severity,
    title: &'static str,
    description: &'static str,
}

impl MethodExposure {
    pub fn new(
        name: &'static str,
        methods: &[&'static str],
        params: Vec<Value>,
        severity: Severity,
        title: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            methods: methods.to_vec(),
            params,
            severity,
            title,
            description,
        }
    }

    /// Métodos tentados, em ordem
    pub fn methods(&self) -> &[&'static str] {
        &self.methods
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

#[async_trait]
impl Probe for MethodExposure {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let Some((method, value)) = first_accepted(ctx, &self.methods, &self.params).await? else {
            return Ok(Vec::new());
        };
        if !is_effective(&value) {
            return Ok(Vec::new());
        }
        let issue = Issue::new(
            self.severity,
            self.title,
            format!("{} ({} respondeu com sucesso)", self.description, method),
        )
        .with_raw(value);
        Ok(vec![issue])
    }
}
