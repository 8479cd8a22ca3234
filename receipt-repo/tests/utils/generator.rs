use chrono::NaiveDate;
use fake::faker::lorem::en::Sentence;
use fake::{Fake, Faker};
use rand::seq::SliceRandom;
use receipt_repo::receipt_repo::NewReceipt;
use rust_decimal::Decimal;

trait Generator<T> {
    fn gen(&mut self) -> T;
}

struct Predefined<T> {
    values: Vec<T>,
    current_pos: usize,
}

impl<T> Predefined<T> {
    fn boxed(values: Vec<T>) -> Box<Predefined<T>> {
        Box::new(Predefined {
            values,
            current_pos: 0,
        })
    }
}

impl<T: Clone> Generator<T> for Predefined<T> {
    fn gen(&mut self) -> T {
        let v = self.values[self.current_pos].clone();
        self.current_pos += 1;
        v
    }
}

struct RandomSample<T> {
    values: Vec<T>,
}

impl<T> RandomSample<T> {
    fn boxed(values: Vec<T>) -> Box<RandomSample<T>> {
        Box::new(RandomSample { values })
    }
}

impl<T: Clone> Generator<T> for RandomSample<T> {
    fn gen(&mut self) -> T {
        self.values.choose(&mut rand::thread_rng()).unwrap().clone()
    }
}

struct FakeGenerator<F: Fake> {
    fake: F,
}

impl<F: Fake> FakeGenerator<F> {
    fn boxed(fake: F) -> Box<FakeGenerator<F>> {
        Box::new(FakeGenerator { fake })
    }
}

impl<T: fake::Dummy<F>, F> Generator<T> for FakeGenerator<F> {
    fn gen(&mut self) -> T {
        self.fake.fake()
    }
}

/// Receipt amounts are non-negative by contract.
struct FakeAmount;

impl Generator<Decimal> for FakeAmount {
    fn gen(&mut self) -> Decimal {
        Decimal::new(Faker.fake::<u16>() as i64, 2)
    }
}

#[allow(dead_code)]
pub struct NewReceiptGenerator {
    desc_gen: Box<dyn Generator<String>>,
    date_gen: Box<dyn Generator<NaiveDate>>,
    amnt_gen: Box<dyn Generator<Decimal>>,
    cat_gen: Box<dyn Generator<i32>>,
    vend_gen: Box<dyn Generator<Option<i32>>>,
    pay_gen: Box<dyn Generator<i32>>,
}

#[allow(dead_code)]
impl NewReceiptGenerator {
    /// Receipts reference live catalog rows, so the generator has to be told
    /// which ids exist.
    pub fn new(category_ids: Vec<i32>, payment_method_ids: Vec<i32>) -> NewReceiptGenerator {
        NewReceiptGenerator {
            desc_gen: FakeGenerator::boxed(Sentence(3..6)),
            date_gen: FakeGenerator::boxed(Faker),
            amnt_gen: Box::new(FakeAmount),
            cat_gen: RandomSample::boxed(category_ids),
            vend_gen: RandomSample::boxed(vec![None]),
            pay_gen: RandomSample::boxed(payment_method_ids),
        }
    }

    pub fn with_categories(mut self, category_ids: Vec<i32>) -> NewReceiptGenerator {
        self.cat_gen = Predefined::boxed(category_ids);
        self
    }

    pub fn with_vendors(mut self, vendor_ids: Vec<Option<i32>>) -> NewReceiptGenerator {
        self.vend_gen = Predefined::boxed(vendor_ids);
        self
    }

    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> NewReceiptGenerator {
        self.date_gen = Predefined::boxed(dates);
        self
    }

    pub fn with_amounts(mut self, amounts: Vec<Decimal>) -> NewReceiptGenerator {
        self.amnt_gen = Predefined::boxed(amounts);
        self
    }

    pub fn generate(&mut self) -> NewReceipt {
        NewReceipt {
            filename: None,
            description: self.desc_gen.gen(),
            amount: self.amnt_gen.gen(),
            date: self.date_gen.gen(),
            category_id: self.cat_gen.gen(),
            vendor_id: self.vend_gen.gen(),
            payment_method_id: self.pay_gen.gen(),
        }
    }

    pub fn generate_many(&mut self, count: usize) -> Vec<NewReceipt> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.generate())
        }
        vec
    }
}
