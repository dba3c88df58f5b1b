use std::array::from_fn;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::action::Directive;
use crate::card::{COLUMN_COUNT, Card, DECK_SIZE, FOUNDATION_COUNT, Suit, full_deck};
use crate::error::{InvalidMove, TableError};
use crate::state::{DrawMode, Slot, Solitaire};

const DEFAULT_SEED: u64 = 0x5EED_C1DE_50F7_0001;

/// Configuration required to bootstrap a table.
#[derive(Clone, Copy, Debug)]
pub struct TableConfig {
    pub draw_mode: DrawMode,
    pub seed: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::Single,
            seed: DEFAULT_SEED,
        }
    }
}

/// Builder that enables deterministic deck injection for tests.
pub struct TableBuilder {
    config: TableConfig,
    deck: Option<Vec<Card>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
            deck: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.config.draw_mode = draw_mode;
        self
    }

    /// Deals from the end of `deck`: column 0 first (face-down cards before
    /// the face-up one), then the remaining 24 cards form the stock with the
    /// last card drawn first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Table, TableError> {
        Table::from_builder(self)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Default)]
struct Column {
    hidden: Vec<Card>,
    face_up: Vec<Card>,
}

impl Column {
    fn accepts(&self, card: Card) -> bool {
        match self.face_up.last() {
            Some(target) => card.stacks_on(*target),
            None => self.hidden.is_empty() && card.is_king(),
        }
    }

    /// Turns the top hidden card once the face-up run is gone.
    fn flip(&mut self) -> Option<Card> {
        if !self.face_up.is_empty() {
            return None;
        }
        let card = self.hidden.pop()?;
        self.face_up.push(card);
        Some(card)
    }
}

/// Reference Klondike table: enforces the rules and executes directives.
pub struct Table {
    config: TableConfig,
    columns: [Column; COLUMN_COUNT],
    foundations: [Option<Card>; FOUNDATION_COUNT],
    stock: Vec<Card>,
    waste: Vec<Card>,
    moves: usize,
    rng: StdRng,
}

impl Table {
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        TableBuilder { config, deck: None }.build()
    }

    fn from_builder(builder: TableBuilder) -> Result<Self, TableError> {
        let TableBuilder { config, deck } = builder;
        let mut table = Table {
            config,
            columns: from_fn(|_| Column::default()),
            foundations: [None; FOUNDATION_COUNT],
            stock: Vec::new(),
            waste: Vec::new(),
            moves: 0,
            rng: StdRng::seed_from_u64(config.seed),
        };
        match deck {
            Some(deck) => table.deal(deck)?,
            None => table.redeal()?,
        }
        Ok(table)
    }

    fn deal(&mut self, mut deck: Vec<Card>) -> Result<(), TableError> {
        if deck.len() != DECK_SIZE {
            return Err(TableError::InvalidConfiguration("deck must hold 52 cards"));
        }
        let mut seen = [false; DECK_SIZE];
        for card in &deck {
            if std::mem::replace(&mut seen[card.index()], true) {
                return Err(TableError::InvalidConfiguration("deck contains duplicates"));
            }
        }
        for (index, column) in self.columns.iter_mut().enumerate() {
            column.hidden.clear();
            column.face_up.clear();
            for _ in 0..index {
                column.hidden.extend(deck.pop());
            }
            column.face_up.extend(deck.pop());
        }
        self.foundations = [None; FOUNDATION_COUNT];
        self.waste.clear();
        self.stock = deck;
        self.moves = 0;
        Ok(())
    }

    /// Shuffles and deals a new game from the table's RNG.
    pub fn redeal(&mut self) -> Result<(), TableError> {
        let mut deck = full_deck();
        deck.shuffle(&mut self.rng);
        self.deal(deck)
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn stock_count(&self) -> usize {
        self.stock.len()
    }

    pub fn waste_count(&self) -> usize {
        self.waste.len()
    }

    pub fn is_won(&self) -> bool {
        self.foundations
            .iter()
            .all(|top| top.is_some_and(Card::is_king))
    }

    /// Turns cards from the stock, recycling the waste first when the stock
    /// is empty. Returns the new waste top.
    pub fn cycle(&mut self) -> Option<Card> {
        if self.stock.is_empty() {
            if self.waste.is_empty() {
                return None;
            }
            self.waste.reverse();
            std::mem::swap(&mut self.stock, &mut self.waste);
        }
        for _ in 0..self.config.draw_mode.cards_per_cycle() {
            match self.stock.pop() {
                Some(card) => self.waste.push(card),
                None => break,
            }
        }
        self.waste.last().copied()
    }

    /// Executes a directive. `reset` deals a fresh game.
    ///
    /// Returns the card the move revealed: a freshly turned tableau card, or
    /// the new waste top after a cycle or a play from the waste.
    pub fn apply(&mut self, directive: &Directive) -> Result<Option<Card>, TableError> {
        let revealed = match *directive {
            Directive::Reset { .. } => {
                self.redeal()?;
                return Ok(None);
            }
            _ if self.is_won() => return Err(TableError::DealComplete),
            Directive::Cycle { .. } => self.cycle(),
            Directive::StockToFoundation => {
                let card = *self.waste.last().ok_or(InvalidMove::NoCardAvailable)?;
                self.bank(card)?;
                self.take_waste()
            }
            Directive::BoardToFoundation { column } => {
                let card = *self
                    .column(column)?
                    .face_up
                    .last()
                    .ok_or(InvalidMove::NoCardAvailable)?;
                self.bank(card)?;
                let source = &mut self.columns[column];
                source.face_up.pop();
                source.flip()
            }
            Directive::StockToBoard { column, .. } => {
                let card = *self.waste.last().ok_or(InvalidMove::NoCardAvailable)?;
                self.check_placement(column, card)?;
                self.columns[column].face_up.push(card);
                self.take_waste()
            }
            Directive::Move { from, to, offset } => {
                if from == to {
                    return Err(InvalidMove::SameColumn(from).into());
                }
                let run = &self.column(from)?.face_up;
                let base = *run.get(offset).ok_or(InvalidMove::Offset {
                    column: from,
                    offset,
                })?;
                self.check_placement(to, base)?;
                let moved = self.columns[from].face_up.split_off(offset);
                self.columns[to].face_up.extend(moved);
                self.columns[from].flip()
            }
        };
        self.moves += 1;
        Ok(revealed)
    }

    /// Moves the top card of `suit`'s foundation back onto `column`.
    ///
    /// Operator-only: the advisor never recommends withdrawing a card.
    pub fn foundation_to_board(&mut self, suit: Suit, column: usize) -> Result<(), TableError> {
        if self.is_won() {
            return Err(TableError::DealComplete);
        }
        let card = self.foundations[suit.index()].ok_or(InvalidMove::NoCardAvailable)?;
        self.check_placement(column, card)?;
        self.foundations[suit.index()] = Card::new(card.rank() - 1, suit);
        self.columns[column].face_up.push(card);
        self.moves += 1;
        Ok(())
    }

    /// Pops the waste top, drawing again when that empties the waste while
    /// the stock still holds cards. Returns the new waste top.
    fn take_waste(&mut self) -> Option<Card> {
        self.waste.pop();
        if self.waste.is_empty() && !self.stock.is_empty() {
            return self.cycle();
        }
        self.waste.last().copied()
    }

    fn column(&self, column: usize) -> Result<&Column, InvalidMove> {
        self.columns
            .get(column)
            .ok_or(InvalidMove::ColumnIndex(column))
    }

    fn check_placement(&self, column: usize, card: Card) -> Result<(), InvalidMove> {
        let target = self.column(column)?;
        if target.accepts(card) {
            return Ok(());
        }
        match target.face_up.last() {
            Some(top) => Err(InvalidMove::CannotStack { card, target: *top }),
            None => Err(InvalidMove::NotAKing(card)),
        }
    }

    fn bank(&mut self, card: Card) -> Result<(), InvalidMove> {
        let slot = &mut self.foundations[card.suit().index()];
        let banked = slot.map_or(0, |top| top.rank());
        if banked + 1 != card.rank() {
            return Err(InvalidMove::FoundationMismatch(card));
        }
        *slot = Some(card);
        Ok(())
    }
}

impl Solitaire for Table {
    fn draw_mode(&self) -> DrawMode {
        self.config.draw_mode
    }

    fn columns(&self) -> [Vec<Slot>; COLUMN_COUNT] {
        from_fn(|idx| {
            let column = &self.columns[idx];
            std::iter::repeat_n(Slot::FaceDown, column.hidden.len())
                .chain(column.face_up.iter().copied().map(Slot::Up))
                .collect()
        })
    }

    fn foundations(&self) -> [Option<Card>; FOUNDATION_COUNT] {
        self.foundations
    }

    fn peek_reserve(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    fn peek_reserve_three(&self) -> [Option<Card>; 3] {
        from_fn(|depth| {
            self.waste
                .len()
                .checked_sub(depth + 1)
                .map(|idx| self.waste[idx])
        })
    }
}
