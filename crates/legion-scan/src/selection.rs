use legion_core::{ClientKind, Error, Result};
use std::collections::BTreeSet;
use tracing::debug;

use crate::probe::Probe;
use crate::registry;
use crate::settings::ProbeSettings;

/// Conjunto de plugins selecionados para a próxima execução
///
/// Um nome só entra no conjunto se existir fábrica para ele e se for
/// aplicável ao cliente conectado no momento da inclusão.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeSelection {
    names: BTreeSet<String>,
}

impl ProbeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclui um plugin; `Unsupported` quando ele não existe ou não se aplica ao cliente
    pub fn add(&mut self, name: &str, kind: ClientKind) -> Result<()> {
        if registry::factory(name).is_none() {
            return Err(Error::Unsupported(format!("plugin desconhecido: {}", name)));
        }
        if !registry::is_supported(name, kind) {
            return Err(Error::Unsupported(format!("{} não é suportado pelo cliente {}", name, kind)));
        }
        debug!("Plugin {} selecionado", name);
        self.names.insert(name.to_string());
        Ok(())
    }

    /// Inclui vários plugins e devolve as recusas, na ordem
    pub fn add_list<'a, I>(&mut self, names: I, kind: ClientKind) -> Vec<Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.add(name, kind).err())
            .collect()
    }

    /// Remove um plugin; retorna se ele estava selecionado
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn selected(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Instancia os plugins selecionados com as configurações atuais
    pub fn instantiate(&self, settings: &ProbeSettings) -> Vec<Box<dyn Probe>> {
        self.names
            .iter()
            .filter_map(|name| registry::factory(name))
            .map(|factory| factory(settings))
            .collect()
    }
}
