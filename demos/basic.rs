use std::sync::Arc;
use std::thread::{sleep, spawn};
use std::time::Duration;

use parking_lot::Mutex;
use satchel::{Blocking, RingBuffer};

fn main() {
    pretty_env_logger::init();

    let buffer = Arc::new(Blocking::new(RingBuffer::new(1 << 10)));

    let ticker_running = Arc::new(Mutex::new(true));
    {
        let running = ticker_running.clone();
        let _ticker = spawn(move || {
            while *running.lock() {
                println!("tick");
                sleep(Duration::from_millis(200));
            }
        });
    }

    let producer = {
        let buffer = buffer.clone();
        spawn(move || {
            println!("Entering Writer");
            let mut sent = 0u64;
            while buffer.push(sent).is_ok() {
                sent += 1;
            }
            println!("Write - total: {}", sent);
            println!("Exiting Writer");
        })
    };

    let consumer = {
        let buffer = buffer.clone();
        spawn(move || {
            println!("Entering Reader");
            let mut received = 0u64;
            while buffer.pop().is_some() {
                received += 1;
            }
            println!("Read - total: {}", received);
            println!("Exiting Reader");
        })
    };

    sleep(Duration::from_secs(1));
    buffer.close();
    println!("STOP");
    *ticker_running.lock() = false;

    producer.join().expect("Producer failed");
    consumer.join().expect("Consumer failed");
}
