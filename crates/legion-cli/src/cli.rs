use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Legion: investigação de segurança de nodes Ethereum
#[derive(Parser, Debug)]
#[command(name = "legion", version, about = "Toolkit de segurança para nodes Ethereum/EVM")]
pub struct Cli {
    /// Arquivo de configuração JSON
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Aumenta o nível de log (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Envia os logs para stderr em vez do arquivo de log
    #[arg(short = 's', long)]
    pub stderr: bool,

    /// Node a conectar antes de executar o comando
    #[arg(short = 'u', long, value_name = "HOST")]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Uma linha digitada no shell interativo
#[derive(Parser, Debug)]
#[command(name = "legion", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Conecta a um node (http, https, ws, wss ou caminho IPC)
    #[command(visible_alias = "connect")]
    Sethost { host: Option<String> },

    /// Informações gerais do node conectado
    Getnodeinfo,

    /// Versão do Legion e do node conectado
    Version,

    /// Investiga contas e namespaces administrativos
    Investigate {
        #[command(subcommand)]
        target: InvestigateCommand,
    },

    /// Consultas de estado da chain
    Query {
        #[command(subcommand)]
        query: QueryCommand,
    },

    /// Ethereum Name Service
    Ens {
        #[command(subcommand)]
        command: EnsCommand,
    },

    /// Plugins de scan do node ou análise de contrato com Mythril
    Scan(ScanArgs),

    /// Conversões de unidades e formatos
    Conversions {
        #[command(subcommand)]
        command: ConvertCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum InvestigateCommand {
    /// Coinbase e contas gerenciadas pelo node
    Accounts {
        /// Mostra o saldo de todas as contas
        #[arg(long)]
        all: bool,
        /// Tenta criar uma conta no node
        #[arg(long)]
        intrusive: bool,
    },
    /// Namespaces administrativos expostos
    Admin {
        /// Tenta adicionar um peer ao node
        #[arg(long)]
        intrusive: bool,
    },
    /// Assina uma mensagem com uma conta do node
    Sign {
        msg: Option<String>,
        account: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum QueryCommand {
    /// Saldo de um endereço
    Balance {
        address: Option<String>,
        block: Option<String>,
    },
    /// Slots de storage de um contrato
    Storage {
        address: Option<String>,
        /// Quantidade de slots lidos a partir do 0
        count: Option<u64>,
        block: Option<String>,
    },
    /// Bytecode de um contrato
    Code {
        address: Option<String>,
        block: Option<String>,
    },
    /// Dados de um bloco
    Block { block: Option<String> },
    /// Dados de uma transação
    Transaction { hash: Option<String> },
    /// Chamada JSON-RPC arbitrária
    Command {
        method: Option<String>,
        #[arg(allow_hyphen_values = true)]
        params: Vec<String>,
    },
    /// Recupera o signatário de uma mensagem assinada
    Ecrecover {
        message: Option<String>,
        signature: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum EnsCommand {
    /// Nome primário de um endereço
    #[command(name = "toName")]
    ToName { address: Option<String> },
    /// Endereço apontado por um nome
    #[command(name = "toAddress")]
    ToAddress { name: Option<String> },
    /// Detalhes de um nome no subgraph
    #[command(name = "info")]
    Info { name: Option<String> },
    /// Nomes pertencentes a um endereço
    #[command(name = "listNames")]
    ListNames { owner: Option<String> },
    /// Subdomínios de um nome
    #[command(name = "listSubdomains")]
    ListSubdomains { name: Option<String> },
}

/// `scan <ação>` gerencia os plugins; `scan <contrato>` roda o Mythril
#[derive(Args, Debug, Clone, PartialEq)]
#[command(args_conflicts_with_subcommands = true)]
pub struct ScanArgs {
    #[command(subcommand)]
    pub action: Option<ScanAction>,

    /// Endereço do contrato
    pub contract: Option<String>,
    /// Módulos do Mythril, separados por vírgula
    pub modules: Option<String>,
    /// Quantidade de transações simbólicas
    pub tx_count: Option<u32>,
    /// Timeout de execução, em segundos
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ScanAction {
    /// Seleciona um plugin
    Add { name: Option<String> },
    /// Seleciona vários plugins (separados por espaço ou vírgula)
    AddList { names: Vec<String> },
    /// Remove um plugin da seleção
    Rm { name: Option<String> },
    /// Lista todos os plugins
    ListAll,
    /// Lista os plugins selecionados
    ListSelected,
    /// Lista os plugins aplicáveis ao Geth
    ListGeth,
    /// Lista os plugins aplicáveis ao Parity
    ListParity,
    /// Executa os plugins selecionados
    Execute,
    /// Altera um parâmetro dos plugins
    Set {
        key: Option<String>,
        value: Option<String>,
    },
    /// Mostra os parâmetros dos plugins
    Settings,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConvertCommand {
    /// Texto ou número decimal para hexadecimal
    #[command(name = "toHex")]
    ToHex { value: Option<String> },
    /// Hexadecimal para texto UTF-8
    #[command(name = "toText")]
    ToText { value: Option<String> },
    /// Texto ou hexadecimal para lista de bytes
    #[command(name = "toBytes")]
    ToBytes { value: Option<String> },
    /// Valor em uma unidade para wei
    #[command(name = "toWei")]
    ToWei {
        amount: Option<String>,
        #[arg(default_value = "ether")]
        unit: String,
    },
    /// Valor em wei para outra unidade
    #[command(name = "fromWei")]
    FromWei {
        amount: Option<String>,
        #[arg(default_value = "ether")]
        unit: String,
    },
    /// Endereço no formato EIP-55
    #[command(name = "toChecksumAddress")]
    ToChecksumAddress { address: Option<String> },
    /// Keccak-256 de texto ou hexadecimal
    #[command(name = "keccak")]
    Keccak { value: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn line(words: &[&str]) -> Command {
        ShellLine::try_parse_from(words).unwrap().command
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
        ShellLine::command().debug_assert();
    }

    #[test]
    fn connect_is_an_alias() {
        assert_eq!(
            line(&["connect", "localhost:8545"]),
            Command::Sethost { host: Some("localhost:8545".into()) }
        );
    }

    #[test]
    fn scan_subcommands_and_contract_form() {
        match line(&["scan", "add", "eth1/NodeSync"]) {
            Command::Scan(args) => {
                assert_eq!(args.action, Some(ScanAction::Add { name: Some("eth1/NodeSync".into()) }));
                assert!(args.contract.is_none());
            }
            other => panic!("comando inesperado: {:?}", other),
        }

        match line(&["scan", "0x06012c8cf97bead5deae237070f9587f8e7a266d", "suicide", "3", "60"]) {
            Command::Scan(args) => {
                assert!(args.action.is_none());
                assert_eq!(args.modules.as_deref(), Some("suicide"));
                assert_eq!(args.tx_count, Some(3));
                assert_eq!(args.timeout, Some(60));
            }
            other => panic!("comando inesperado: {:?}", other),
        }
    }

    #[test]
    fn camel_case_names() {
        assert_eq!(
            line(&["ens", "toAddress", "legion.eth"]),
            Command::Ens { command: EnsCommand::ToAddress { name: Some("legion.eth".into()) } }
        );
        assert!(matches!(
            line(&["conversions", "fromWei", "1000"]),
            Command::Conversions { command: ConvertCommand::FromWei { unit, .. } } if unit == "ether"
        ));
    }

    #[test]
    fn raw_command_keeps_json_params() {
        assert_eq!(
            line(&["query", "command", "eth_call", r#"{"to":"0x00"}"#, "latest"]),
            Command::Query {
                query: QueryCommand::Command {
                    method: Some("eth_call".into()),
                    params: vec![r#"{"to":"0x00"}"#.into(), "latest".into()],
                }
            }
        );
    }

    #[test]
    fn global_flags() {
        let cli = Cli::try_parse_from(["legion", "-vv", "--stderr", "-u", "localhost", "getnodeinfo"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.stderr);
        assert_eq!(cli.host.as_deref(), Some("localhost"));
        assert_eq!(cli.command, Some(Command::Getnodeinfo));
    }
}
