//! Abstract collaborator interfaces (spec §6 "Collaborator interfaces
//! consumed (treated as abstract ports)"). None of these are implemented
//! here — ledger objects, transaction builders, blockchain providers and
//! wallet signing are explicit Non-goals (spec §1) — but the *shape* a host
//! application plugs into is part of this core's contract, so it is given
//! as a trait rather than left undocumented.
//!
//! Grounded on `pallas-validate::uplc::script_context::ScriptInfo<T>`: the
//! same six-way purpose split, generalized here over an abstract
//! transaction/output/query type instead of that crate's concrete ledger
//! types (which are out of scope per spec §1).

use plutus_data::Data;

/// Why a script is being run (spec §6: "a redeemer purpose (spend, mint,
/// cert, reward, vote, propose)"). V1/V2/V3 scripts only ever see a subset
/// of these; the set itself is version-independent.
#[derive(Debug, Clone)]
pub enum RedeemerPurpose<Input, Cert, Voter, Proposal> {
    Minting { policy_id: Vec<u8> },
    Spending { input: Input },
    Rewarding { stake_credential: Vec<u8> },
    Certifying { index: usize, certificate: Cert },
    Voting { voter: Voter },
    Proposing { index: usize, procedure: Proposal },
}

/// Builds the `Data` value a script actually sees (spec §6 "given a
/// transaction and a redeemer purpose, produce a `Data` value"). `Tx` is
/// left abstract: this core never constructs or inspects transaction
/// bodies itself (spec §1 Non-goals).
pub trait ScriptContextProducer<Tx, Input, Cert, Voter, Proposal> {
    fn script_context(&self, tx: &Tx, purpose: &RedeemerPurpose<Input, Cert, Voter, Proposal>) -> Data;
}

/// Read-only access to chain state (spec §6 `BlockchainProvider`). `Utxo`,
/// `Params`, `Tx` and `TxId` are left abstract for the same reason.
pub trait BlockchainProvider<Query, Utxo, Params, Tx, TxId, SubmitError> {
    fn find_utxos(&self, query: &Query) -> Vec<Utxo>;
    fn protocol_params(&self) -> Params;
    fn current_slot(&self) -> u64;
    fn submit(&self, tx: Tx) -> Result<TxId, SubmitError>;
}

/// Transaction signing (spec §6 `TransactionSigner`).
pub trait TransactionSigner<Tx> {
    fn sign(&self, tx: Tx) -> Tx;
}

/// An append-only sink for operational log lines (spec §6 "Logger sink:
/// `append(string) -> void`"). Distinct from the UPLC `trace` output
/// (`EvalOutcome::traces`/`EvalFailure::traces`), which belongs to the
/// evaluated program, not the embedding application (SPEC_FULL.md
/// "Ambient stack — Logging").
pub trait LoggerSink {
    fn append(&mut self, line: String);
}
